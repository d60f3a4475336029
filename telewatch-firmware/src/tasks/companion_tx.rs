//! Companion UART transmit task
//!
//! Sends queued watch messages to the companion.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use telewatch_protocol::WatchMessage;

use crate::channels::OUTBOX;

/// Companion TX task - drains the outbox onto the UART
#[embassy_executor::task]
pub async fn companion_tx_task(mut tx: BufferedUartTx) {
    info!("Companion TX task started");

    loop {
        let message = OUTBOX.receive().await;
        send_message(&mut tx, &message).await;
    }
}

async fn send_message(tx: &mut BufferedUartTx, message: &WatchMessage) {
    let frame = match message.to_frame() {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Failed to encode message: {:?}", e);
            return;
        }
    };

    match frame.encode_to_vec() {
        Ok(bytes) => {
            if let Err(e) = tx.write_all(&bytes).await {
                warn!("Failed to send message: {:?}", e);
            } else {
                trace!("Sent {} bytes", bytes.len());
            }
        }
        Err(e) => warn!("Failed to frame message: {:?}", e),
    }
}
