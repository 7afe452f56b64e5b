//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use git2::{Oid, Repository, Signature};

use reword::{CommandOutput, CommandRunner, Invocation, SystemRunner};

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Get the test signature for commits.
    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Create a commit with the given message. Returns the commit OID.
    pub fn commit(&self, message: &str) -> Oid {
        let sig = self.signature();

        let file_path = self.dir.path().join("test.txt");
        std::fs::write(&file_path, message).expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_path(Path::new("test.txt"))
            .expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a lightweight tag pointing to the given OID.
    pub fn tag_lightweight(&self, name: &str, oid: Oid) {
        let obj = self
            .repo
            .find_object(oid, None)
            .expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &obj, false)
            .expect("Failed to create lightweight tag");
    }
}

/// Build a model CLI envelope around `response`.
pub fn model_envelope(response: &str) -> String {
    serde_json::json!({ "response": response, "stats": {} }).to_string()
}

/// Canned model reply for one message.
#[derive(Debug, Clone)]
pub enum ModelReply {
    Suggest(String),
    Fail { code: i32, stderr: String },
}

/// Runner that answers git history queries and model calls from fixed data,
/// delegates `git diff` to the real git, and records every call.
#[derive(Default)]
pub struct ScriptedRunner {
    /// Output of `git rev-list`, one commit per entry.
    pub rev_list: Vec<String>,
    /// Raw `git cat-file -p` output per commit.
    pub objects: HashMap<String, String>,
    /// Model reply keyed by the original message body.
    pub replies: HashMap<String, ModelReply>,
    /// Send every git call to the real git instead of the fixed data.
    pub real_git: bool,
    pub calls: Mutex<Vec<Invocation>>,
    pub paged: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner for a real repository: only the model is scripted.
    pub fn with_real_git() -> Self {
        Self {
            real_git: true,
            ..Self::default()
        }
    }

    /// Script the model's reply for `message`.
    pub fn with_reply(mut self, message: &str, reply: ModelReply) -> Self {
        self.replies.insert(message.to_string(), reply);
        self
    }

    /// Add a commit whose message is `message`.
    pub fn with_commit(mut self, id: &str, message: &str, reply: ModelReply) -> Self {
        self.rev_list.push(id.to_string());
        self.objects.insert(
            id.to_string(),
            format!(
                "tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n\
                 author Test User <test@example.com> 1700000000 +0000\n\
                 committer Test User <test@example.com> 1700000000 +0000\n\
                 \n\
                 {message}\n"
            ),
        );
        self.replies.insert(message.to_string(), reply);
        self
    }

    /// Number of recorded calls whose program is `program` and whose
    /// arguments include `arg` (any argument when `arg` is empty).
    pub fn count_calls(&self, program: &str, arg: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|inv| {
                inv.program == program && (arg.is_empty() || inv.args.iter().any(|a| a == arg))
            })
            .count()
    }

    fn model_reply(&self, invocation: &Invocation) -> CommandOutput {
        let input = invocation.stdin.as_deref().unwrap_or_default();
        let message = input
            .strip_prefix("This is the message:\n")
            .and_then(|rest| rest.strip_suffix('\n'))
            .unwrap_or(input);

        match self.replies.get(message) {
            Some(ModelReply::Suggest(text)) => ok(model_envelope(text)),
            Some(ModelReply::Fail { code, stderr }) => CommandOutput {
                code: Some(*code),
                stdout: String::new(),
                stderr: stderr.clone(),
            },
            None => panic!("No scripted reply for message {message:?}"),
        }
    }
}

fn ok(stdout: String) -> CommandOutput {
    CommandOutput {
        code: Some(0),
        stdout,
        stderr: String::new(),
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn output(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        self.calls.lock().unwrap().push(invocation.clone());

        if invocation.program != "git" {
            return Ok(self.model_reply(invocation));
        }
        if self.real_git {
            return SystemRunner.output(invocation).await;
        }

        let args: Vec<&str> = invocation.args.iter().map(String::as_str).collect();
        match args.as_slice() {
            ["rev-list", _] => Ok(ok(self
                .rev_list
                .iter()
                .map(|id| format!("{id}\n"))
                .collect())),
            ["cat-file", "-p", id] => Ok(ok(self.objects.get(*id).cloned().unwrap_or_default())),
            _ => SystemRunner.output(invocation).await,
        }
    }

    async fn interactive(&self, invocation: &Invocation) -> io::Result<Option<i32>> {
        self.calls.lock().unwrap().push(invocation.clone());
        self.paged
            .lock()
            .unwrap()
            .push(invocation.stdin.clone().unwrap_or_default());
        Ok(Some(0))
    }
}
