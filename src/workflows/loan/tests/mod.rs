mod common;
mod predictor;
mod routing;
