mod dfs;

pub use dfs::longest_simple_path;
