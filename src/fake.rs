//! Scripted stand-in for the `svn` binary, shared by the unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::exec::{CommandExecutor, Decoder, Launcher, RawOutput};
use crate::svn::SvnClient;

pub(crate) const ROOT: &str = "svn://svn_host";

/// Answers commands from a table keyed by the space-joined argv and records
/// every launch. Unscripted commands fail without an error code.
#[derive(Clone, Default)]
pub(crate) struct FakeSvn {
    responses: Arc<Mutex<HashMap<String, RawOutput>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeSvn {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, command: &str, stdout: &str) -> Self {
        self.script(command, 0, stdout, "");
        self
    }

    pub(crate) fn respond_err(self, command: &str, stderr: &str) -> Self {
        self.script(command, 1, "", stderr);
        self
    }

    /// `svn info <url>` succeeds.
    pub(crate) fn existing(self, url: &str) -> Self {
        self.respond(&format!("svn info {}", url), &format!("URL: {}\n", url))
    }

    /// `svn info <url>` fails with `E200009`.
    pub(crate) fn missing(self, url: &str) -> Self {
        self.respond_err(
            &format!("svn info {}", url),
            &format!(
                "svn: warning: W170000: URL '{}' non-existent in revision 10\n\
                 svn: E200009: Could not display info for all targets because some targets don't exist",
                url
            ),
        )
    }

    /// `svn ls <url> --xml` returns `entries` as `(kind, name, revision)`.
    pub(crate) fn listing(self, url: &str, entries: &[(&str, &str, &str)]) -> Self {
        self.respond(&format!("svn ls {} --xml", url), &list_xml(url, entries))
    }

    /// `svn pg svn:externals <url> --xml` returns one target per
    /// `(path, definitions)` pair.
    pub(crate) fn externals(self, url: &str, targets: &[(&str, &str)]) -> Self {
        self.respond(
            &format!("svn pg svn:externals {} --xml", url),
            &externals_xml(targets),
        )
    }

    /// `svn pg svn:externals <url> --xml` reports the property as unset.
    pub(crate) fn no_externals(self, url: &str) -> Self {
        self.respond_err(
            &format!("svn pg svn:externals {} --xml", url),
            "svn: warning: W200017: Property 'svn:externals' not found\n\
             svn: E200000: A problem occurred; see other errors for details",
        )
    }

    fn script(&self, command: &str, exit_code: i32, stdout: &str, stderr: &str) {
        self.responses.lock().unwrap().insert(
            command.to_string(),
            RawOutput {
                exit_code,
                stdout: stdout.as_bytes().to_vec(),
                stderr: stderr.as_bytes().to_vec(),
            },
        );
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn client(&self) -> SvnClient {
        let executor = CommandExecutor::with_launcher(Box::new(self.clone()), Decoder::default());
        SvnClient::with_executor(executor, "svn", ROOT)
    }
}

impl Launcher for FakeSvn {
    fn launch(&self, command: &[String], _quiet: bool) -> Result<RawOutput> {
        let key = command.join(" ");
        self.calls.lock().unwrap().push(key.clone());
        let scripted = self.responses.lock().unwrap().get(&key).cloned();
        Ok(scripted.unwrap_or_else(|| RawOutput {
            exit_code: 1,
            stdout: Vec::new(),
            stderr: format!("fake svn: nothing scripted for `{}`", key).into_bytes(),
        }))
    }
}

pub(crate) fn list_xml(url: &str, entries: &[(&str, &str, &str)]) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<lists>\n<list\n   path=\"{}\">\n",
        url
    );
    for (kind, name, revision) in entries {
        xml.push_str(&format!(
            "<entry\n   kind=\"{}\">\n<name>{}</name>\n<commit\n   revision=\"{}\">\n\
             <author>alice</author>\n<date>2024-03-01T08:00:00.000000Z</date>\n</commit>\n</entry>\n",
            kind, name, revision
        ));
    }
    xml.push_str("</list>\n</lists>\n");
    xml
}

pub(crate) fn externals_xml(targets: &[(&str, &str)]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<properties>\n");
    for (path, definitions) in targets {
        xml.push_str(&format!(
            "<target\n   path=\"{}\">\n<property\n   name=\"svn:externals\">{}\n</property>\n</target>\n",
            path, definitions
        ));
    }
    xml.push_str("</properties>\n");
    xml
}
