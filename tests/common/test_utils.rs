#![allow(dead_code)]
use std::fs;
use std::io::Result as IoResult;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// A scratch JavaScript project with a fake `flow` binary.
///
/// The fake binary appends its arguments to `calls.log` and prints whatever
/// `response.json` holds, so tests control what "flow" reports.
pub struct TestProject {
    /// The temporary directory. When this is dropped, the directory and its contents are removed.
    pub temp_dir: TempDir,
    /// Where the JavaScript sources live.
    pub src: PathBuf,
    /// Where the fake flow binary and its files live.
    pub tools: PathBuf,
}

impl TestProject {
    pub fn new() -> IoResult<Self> {
        let temp_dir = tempdir()?;
        // Canonical, so paths match the ones flow-e resolves and reports.
        let root = temp_dir.path().canonicalize()?;
        let src = root.join("src");
        let tools = root.join("tools");
        fs::create_dir_all(&src)?;
        fs::create_dir_all(&tools)?;
        let project = TestProject {
            temp_dir,
            src,
            tools,
        };
        project.write_fake_flow()?;
        project.respond(r#"{"passed":true,"errors":[]}"#)?;
        Ok(project)
    }

    fn write_fake_flow(&self) -> IoResult<()> {
        let script = self.flow_bin();
        fs::write(
            &script,
            "#!/bin/sh\n\
             here=\"$(dirname \"$0\")\"\n\
             echo \"$@\" >> \"$here/calls.log\"\n\
             cat \"$here/response.json\"\n",
        )?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;
        }
        Ok(())
    }

    pub fn flow_bin(&self) -> PathBuf {
        self.tools.join("flow")
    }

    /// Sets what the fake flow prints on its next runs.
    pub fn respond(&self, json: &str) -> IoResult<()> {
        fs::write(self.tools.join("response.json"), json)
    }

    /// Writes a source file and returns its absolute path.
    pub fn source(&self, name: &str, text: &str) -> IoResult<PathBuf> {
        let path = self.src.join(name);
        fs::write(&path, text)?;
        Ok(path)
    }

    /// One line per flow invocation.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.tools.join("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Names of `.flowconfig*` files currently in `src`.
    pub fn flowconfigs(&self) -> Vec<String> {
        fs::read_dir(&self.src)
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .map(|e| e.file_name().to_string_lossy().to_string())
                    .filter(|n| n.starts_with(".flowconfig"))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

/// A flow error payload with one single-fragment diagnostic in `path`.
pub fn one_error_in(path: &Path, descr: &str) -> String {
    format!(
        r#"{{"passed":false,"errors":[{{"kind":"infer","level":"error","message":[{{"descr":"{}","level":"error","path":"{}","line":2,"endline":2,"start":5,"end":9}}]}}]}}"#,
        descr,
        path.display()
    )
}
