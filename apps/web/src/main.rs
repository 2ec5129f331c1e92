use wasm_bindgen_futures::spawn_local;

fn main() {
    spawn_local(portfolio_web::start());
}
