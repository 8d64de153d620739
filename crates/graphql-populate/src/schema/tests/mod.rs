mod schema_index_tests;
