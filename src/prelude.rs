//! Our own prelude that is wildcard imported in every other module. That way,
//! commonly used symbols are easily available.

pub(crate) use anyhow::{anyhow, Context as _, Result};
pub(crate) use tracing::{error, warn, info, debug, trace};
