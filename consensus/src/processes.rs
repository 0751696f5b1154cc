pub mod chain_selection;
