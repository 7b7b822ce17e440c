//! In-memory doubles for the remote API and the operator console.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;

use roster_core::types::{Email, GroupId, GroupName, RemoteGroup, RemoteMember};
use roster_sync::{ApiError, Console, DirectoryApi, InviteOutcome};

/// One recorded API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchGroups,
    Invite(Vec<String>, GroupId),
    Delete(Vec<String>),
    CreateGroup(String),
    Move(Vec<String>, GroupId),
}

/// A remote service that applies every mutation to its own group listing,
/// so a second run observes the effects of the first.
pub struct FakeApi {
    pub groups: Vec<RemoteGroup>,
    pub calls: Vec<Call>,
    pub refuse_invites: Vec<String>,
    pub fail_create: Option<String>,
    next_id: i64,
}

impl FakeApi {
    /// An account with no groups yet; add them with [`FakeApi::group`].
    /// The first group added is the Default group.
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            calls: Vec::new(),
            refuse_invites: Vec::new(),
            fail_create: None,
            next_id: 1,
        }
    }

    pub fn group(mut self, id: i64, name: &str, members: &[&str]) -> Self {
        self.groups.push(RemoteGroup {
            id: GroupId(id),
            name: GroupName::from(name),
            members: members
                .iter()
                .map(|e| RemoteMember {
                    email: Email::from(*e),
                })
                .collect(),
        });
        self.next_id = self.next_id.max(id + 1);
        self
    }

    pub fn members_of(&self, name: &str) -> Vec<String> {
        self.groups
            .iter()
            .find(|g| g.name.0 == name)
            .map(|g| g.members.iter().map(|m| m.email.0.clone()).collect())
            .unwrap_or_default()
    }

    pub fn group_id(&self, name: &str) -> Option<GroupId> {
        self.groups.iter().find(|g| g.name.0 == name).map(|g| g.id)
    }

    pub fn mutations(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| !matches!(c, Call::FetchGroups))
            .collect()
    }

    fn remove_everywhere(&mut self, email: &Email) {
        for group in &mut self.groups {
            group.members.retain(|m| &m.email != email);
        }
    }

    fn add_to(&mut self, email: &Email, id: GroupId) -> Result<(), ApiError> {
        let group = self
            .groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| ApiError::Status {
                endpoint: "fake".into(),
                status: 404,
                body: format!("no group {id}"),
            })?;
        group.members.push(RemoteMember {
            email: email.clone(),
        });
        Ok(())
    }
}

fn strings(emails: &[Email]) -> Vec<String> {
    emails.iter().map(|e| e.0.clone()).collect()
}

impl DirectoryApi for FakeApi {
    fn fetch_groups(&mut self) -> Result<Vec<RemoteGroup>, ApiError> {
        self.calls.push(Call::FetchGroups);
        Ok(self.groups.clone())
    }

    fn invite_users(
        &mut self,
        emails: &[Email],
        group: GroupId,
    ) -> Result<InviteOutcome, ApiError> {
        self.calls.push(Call::Invite(strings(emails), group));
        let mut outcome = InviteOutcome::default();
        for email in emails {
            if self.refuse_invites.contains(&email.0) {
                outcome.not_invited.push(email.clone());
                continue;
            }
            self.add_to(email, group)?;
        }
        Ok(outcome)
    }

    fn delete_users(&mut self, emails: &[Email]) -> Result<(), ApiError> {
        self.calls.push(Call::Delete(strings(emails)));
        for email in emails {
            self.remove_everywhere(email);
        }
        Ok(())
    }

    fn create_group(&mut self, name: &GroupName) -> Result<(), ApiError> {
        self.calls.push(Call::CreateGroup(name.0.clone()));
        if self.fail_create.as_deref() == Some(name.as_str()) {
            return Err(ApiError::Status {
                endpoint: "POST /groups".into(),
                status: 500,
                body: "boom".into(),
            });
        }
        self.groups.push(RemoteGroup {
            id: GroupId(self.next_id),
            name: name.clone(),
            members: vec![],
        });
        self.next_id += 1;
        Ok(())
    }

    fn move_users(&mut self, emails: &[Email], group: GroupId) -> Result<(), ApiError> {
        self.calls.push(Call::Move(strings(emails), group));
        for email in emails {
            self.remove_everywhere(email);
            self.add_to(email, group)?;
        }
        Ok(())
    }
}

/// Console that replays canned answers and records everything shown.
#[derive(Default)]
pub struct ScriptedConsole {
    pub answers: VecDeque<String>,
    pub lines: Vec<String>,
    pub questions: usize,
}

impl ScriptedConsole {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl Console for ScriptedConsole {
    fn show(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_owned());
        Ok(())
    }

    fn ask(&mut self, _question: &str) -> io::Result<Option<String>> {
        self.questions += 1;
        Ok(self.answers.pop_front())
    }
}
