//! Demonstrates tracing integration with effects
//!
//! Run with: cargo run --example tracing_demo --features tracing

use either_io::{EitherIO, FailureFn, Fault};

#[derive(Debug)]
#[allow(dead_code)]
enum StoreError {
    OutOfStock(String),
    Unexpected(String),
}

fn store_failure() -> FailureFn<StoreError> {
    FailureFn::new(|fault: Fault| StoreError::Unexpected(fault.to_string()))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    tracing::info!("Starting tracing demo");

    let order = check_stock("widget")
        .flat_map(|stock, failure| reserve(stock, failure))
        .tap(|id| tracing::info!(reservation = id, "reserved"))
        .instrument(tracing::info_span!("order", item = "widget"));

    match order.run().await {
        Ok(id) => tracing::info!("Order completed: {}", id),
        Err(e) => tracing::error!("Order failed: {:?}", e),
    }

    // A panicking step is logged at debug level and becomes a typed failure.
    let broken = check_stock("gadget")
        .map(|_| -> u32 { panic!("inventory service unreachable") })
        .instrument(tracing::info_span!("order", item = "gadget"));

    match broken.run().await {
        Ok(id) => tracing::info!("Order completed: {}", id),
        Err(e) => tracing::error!("Order failed: {:?}", e),
    }

    let sold_out =
        EitherIO::<StoreError, u32>::raise(|| StoreError::OutOfStock("gizmo".to_string()))
            .tap_left(|e| tracing::warn!("rejected: {:?}", e));
    let _ = sold_out.safe_run().await;
}

fn check_stock(item: &'static str) -> EitherIO<StoreError, u32> {
    EitherIO::from_async(store_failure(), move || async move {
        tracing::debug!(item, "checking stock");
        3
    })
}

fn reserve(stock: u32, failure: &FailureFn<StoreError>) -> EitherIO<StoreError, u32> {
    EitherIO::from_fn(failure.clone(), move || stock * 1000 + 1)
}
