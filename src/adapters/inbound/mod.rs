mod lambda_handler;
mod local_gateway;

pub use lambda_handler::{handle_event, GatewayEvent, GatewayResponse, LambdaHandler};
pub use local_gateway::{router, GatewayState, LocalGateway};
