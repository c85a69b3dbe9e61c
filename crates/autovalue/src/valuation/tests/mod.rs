mod common;
mod intake;
mod recommendation;
