mod file_reader_tests;
pub(crate) mod test_utils;
