//! Objects used to read Argumentation frameworks and write answers to problems.

mod aspartix_reader;
pub use aspartix_reader::AspartixReader;

mod iccma17_writer;
pub use iccma17_writer::Iccma17Writer;

mod specs;
pub use specs::InstanceReader;
pub use specs::ResponseWriter;
pub use specs::WarningHandler;

mod tgf_reader;
pub use tgf_reader::TgfReader;

mod warning_result;
