pub mod base;
pub mod config;
pub mod entity;
pub mod pacman;
pub mod pacman_ai;
pub mod pathing;
pub mod score;
pub mod session;
pub mod snake;
pub mod snake_ai;
