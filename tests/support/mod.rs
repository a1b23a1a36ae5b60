pub mod failing;
