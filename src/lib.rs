pub mod hanoi_solver;
pub mod move_prompt;
pub mod puzzle_state;
pub mod session;
pub mod tower_renderer;
pub mod tower_renderer_factory;
pub mod tower_renderer_quiet;
