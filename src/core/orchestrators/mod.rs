pub mod selection_orchestrator;
