pub mod protected_file;
