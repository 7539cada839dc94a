mod catalog;

pub(crate) use catalog::{cmd_export, cmd_frequency, cmd_info, cmd_lookup, cmd_resolve};
