mod records;

pub use records::RecordServiceImpl;
