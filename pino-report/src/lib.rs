//! pino-report: settlement statement rendering and image-artifact export.

pub mod export;
pub mod listing;
pub mod statement;
pub mod svg;

pub use export::{ExportOptions, artifact_file_name, calculation_date, export_all, export_one};
pub use listing::{render_listing_text, write_listing_csv};
pub use statement::{
    Statement, StatementOptions, StatementRow, build_statement, format_distance, format_yen,
    render_statement_text,
};
pub use svg::render_statement_svg;
