use crate::domain::entities::table::Table;
use crate::usecase::error::ReviewError;

/// Parse/serialize pair for the tabular text the reviewer loads and exports.
///
/// `decode` must hand back a table whose rows are all as wide as its header;
/// column fix-ups (check column, editable name column) happen in the service.
pub trait TableCodec: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<Table, ReviewError>;
    fn encode(&self, table: &Table) -> Result<Vec<u8>, ReviewError>;
}
