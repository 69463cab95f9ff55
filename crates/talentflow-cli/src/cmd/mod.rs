pub mod candidate;
pub mod init;
pub mod job;
pub mod seed;
pub mod serve;
