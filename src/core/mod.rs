pub mod action;
pub mod module;
pub mod mount;
pub mod remote;
pub mod request;
pub mod route;

pub use action::{Action, NotifyLevel};
pub use module::Module;
pub use mount::{MountCounter, MountId};
pub use remote::{FetchStatus, Remote};
pub use request::{Outcome, Payload, Request, Resource, Submission};
pub use route::Route;
