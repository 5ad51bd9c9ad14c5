pub mod add;
pub mod apply;
pub mod catalog;
pub mod init;
pub mod pages;
pub mod set;
pub mod show;

mod session;

pub use add::{add, AddArgs};
pub use apply::{apply, ApplyArgs};
pub use catalog::{catalog, CatalogArgs};
pub use init::{init, InitArgs};
pub use pages::pages;
pub use set::{set, SetArgs};
pub use show::{show, ShowArgs};
