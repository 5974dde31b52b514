pub mod crawled_data_db;
