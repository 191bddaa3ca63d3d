//! I²C slave responder (pull mode).
//!
//! The secondary MCU addresses us at `I2C_SLAVE_ADDR` and reads the last
//! relayed key as plain text. Once the text runs out we clock out NUL,
//! so a master reading a fixed-size block sees a C string. An empty slot
//! therefore reads back as all NUL.

use defmt::{debug, info, warn};
use embassy_rp::i2c_slave::{Command, Config, I2cSlave};
use embassy_rp::peripherals::{I2C1, PIN_6, PIN_7};
use embassy_rp::{bind_interrupts, i2c};
use hid_relay::config::{I2C_SLAVE_ADDR, RELAY_SLOT_CAPACITY};
use hid_relay::relay::{ActivityIndicator, PullEndpoint};

bind_interrupts!(struct Irqs {
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});

/// Master writes longer than this are truncated.
const RX_BUF_SIZE: usize = 32;

/// Byte clocked out after the key text.
const FILL: u8 = 0x00;

/// Configure I²C1 as a slave on SCL=GPIO7 / SDA=GPIO6.
pub fn init(i2c: I2C1, scl: PIN_7, sda: PIN_6) -> I2cSlave<'static, I2C1> {
    let mut config = Config::default();
    config.addr = u16::from(I2C_SLAVE_ADDR);
    config.sda_pullup = true;
    config.scl_pullup = true;

    info!("I2C slave listening at {=u8:#x}", I2C_SLAVE_ADDR);
    I2cSlave::new(i2c, scl, sda, Irqs, config)
}

/// Serve bus transactions forever.
pub async fn serve<I: ActivityIndicator>(
    mut dev: I2cSlave<'static, I2C1>,
    endpoint: PullEndpoint<'static, I>,
) -> ! {
    let mut rx = [0u8; RX_BUF_SIZE];
    let mut tx = [0u8; RELAY_SLOT_CAPACITY];

    loop {
        match dev.listen(&mut rx).await {
            Ok(Command::Read) => respond(&mut dev, &endpoint, &mut tx).await,
            Ok(Command::Write(len)) => endpoint.on_bus_data_received(&rx[..len]),
            Ok(Command::WriteRead(len)) => {
                endpoint.on_bus_data_received(&rx[..len]);
                respond(&mut dev, &endpoint, &mut tx).await;
            }
            Ok(Command::GeneralCall(len)) => debug!("I2C general call ({} bytes) ignored", len),
            Err(e) => warn!("I2C listen error: {}", e),
        }
    }
}

async fn respond<I: ActivityIndicator>(
    dev: &mut I2cSlave<'static, I2C1>,
    endpoint: &PullEndpoint<'static, I>,
    tx: &mut [u8],
) {
    let n = endpoint.on_bus_read_requested(tx);
    if let Err(e) = dev.respond_and_fill(&tx[..n], FILL).await {
        warn!("I2C read response failed: {}", e);
    }
}
