//! Backend commands queued from UI to backend worker.

use shared::domain::{PartyDraft, PartyId};

#[derive(Debug)]
pub enum BackendCommand {
    Bootstrap,
    SelectParty { party_id: PartyId },
    CreateParty { draft: PartyDraft },
    DeleteParty { party_id: PartyId },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Bootstrap => "bootstrap",
            BackendCommand::SelectParty { .. } => "select_party",
            BackendCommand::CreateParty { .. } => "create_party",
            BackendCommand::DeleteParty { .. } => "delete_party",
        }
    }
}
