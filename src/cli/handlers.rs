//! Handler listing

use ovpn_handler_core::HandlerRegistry;

pub fn run_handlers(registry: &HandlerRegistry) {
    for name in registry.names() {
        println!("{}", name);
    }
}
