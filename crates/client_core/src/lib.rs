//! Client core for the party planner: gateway to the event service, the
//! application state, view builders, render orchestration and the
//! interaction handlers that tie them together.

pub mod config;
pub mod error;
pub mod gateway;
pub mod planner;
pub mod render;
pub mod state;
pub mod view;

pub use config::{load_settings, Settings};
pub use error::GatewayError;
pub use gateway::{HttpPartyGateway, PartyGateway};
pub use planner::{Outcome, Planner};
pub use render::{render, Page, RenderSink, Slot};
pub use state::{AppState, SelectionToken};
pub use view::{FormError, FormField, NewPartyForm, Node, Trigger};
