pub mod output_formatter;
pub mod output_writer;

pub use output_formatter::OutputFormatter;
pub use output_writer::OutputWriter;
