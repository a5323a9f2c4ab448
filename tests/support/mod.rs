pub mod network_harness;
