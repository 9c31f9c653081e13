mod folder_walker;
use anyhow::Result;
pub use folder_walker::*;

use super::Source;

pub trait SourceProvider {
    fn apply(&self, source: &mut Source) -> Result<()>;
}
