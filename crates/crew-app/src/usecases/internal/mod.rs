pub mod flag_io;
