pub use self::columns::{parse_column, parse_columns};
pub use self::pipeline::{Input, Pipeline, Record, RecordReader, RecordReaderBuilder, Separator};
pub use self::source::{LineSource, SourceKind};

mod columns;
mod pipeline;
mod source;
