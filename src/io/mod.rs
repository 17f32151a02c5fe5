//! Objects used to read Argumentation frameworks and to write answers to problems.

mod aspartix_reader;
pub use aspartix_reader::AspartixReader;

mod aspartix_writer;
pub use aspartix_writer::AspartixWriter;

mod iccma23_reader;
pub use iccma23_reader::Iccma23Reader;

mod iccma23_writer;
pub use iccma23_writer::Iccma23Writer;

mod specs;
pub use specs::InstanceReader;
pub use specs::ResponseWriter;
pub use specs::WarningHandler;

mod warning_result;
