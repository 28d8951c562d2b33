pub mod children;
pub mod count;
pub mod options;
pub mod roots;
pub mod tree;
