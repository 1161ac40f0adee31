mod search;
mod user;

pub use search::{about_description, filter_users_by_name};
pub use user::{Address, AddressPatch, Company, User, UserPatch};
