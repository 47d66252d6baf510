use super::*;

mod forms;
mod library;
mod navigation;
