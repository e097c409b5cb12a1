//! Command orchestration helpers from UI triggers to the backend command queue.

use client_core::{FormError, NewPartyForm, Trigger};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Maps a clicked trigger to the command the backend should run. Submitting
/// an incomplete form yields the validation error instead.
pub fn command_for_trigger(
    trigger: Trigger,
    form: &NewPartyForm,
) -> Result<BackendCommand, FormError> {
    Ok(match trigger {
        Trigger::SelectParty(party_id) => BackendCommand::SelectParty { party_id },
        Trigger::DeleteParty(party_id) => BackendCommand::DeleteParty { party_id },
        Trigger::SubmitNewParty => BackendCommand::CreateParty {
            draft: form.to_draft()?,
        },
    })
}

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "UI command queue is full; please retry".to_string();
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Backend worker stopped; restart the planner".to_string();
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
        }
    }
}
