#[macro_use]
extern crate macro_attr;

#[macro_use]
extern crate enum_derive;

pub mod list;
pub mod task;
pub mod user;
