//! Disease entry routes: listing, option sets, suggestions, statistics, CRUD, import/export.

mod list_entries;
pub use list_entries::list_entries;

mod unique_values;
pub use unique_values::unique_values;

mod search_suggestions;
pub use search_suggestions::search_suggestions;

mod statistics;
pub use statistics::statistics_overview;

mod entry_crud;
pub use entry_crud::{create_entry, delete_entry, get_entry, update_entry};

mod export_data;
pub use export_data::{ExportParams, export_data};

mod bulk_import;
pub use bulk_import::bulk_import;
