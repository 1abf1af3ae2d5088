mod identity;
mod lanes;
mod scope;
mod task;

pub use crate::{identity::*, lanes::*, scope::*, task::*};
