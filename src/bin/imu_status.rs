//! IMU status firmware for Raspberry Pi Pico 2 W
//!
//! Samples an LSM6DSL and prints the latest accelerometer and gyroscope
//! reading over defmt RTT once per reporting interval. A tri-color LED shows
//! red while initializing, green when ready, and blue during each reporting
//! cycle.
//!
//! # Hardware
//!
//! - LSM6DSL on I2C0 (SDA: GPIO 4, SCL: GPIO 5), address 0x6A
//! - LSM6DSL INT1 (data ready): GPIO 6
//! - Sensor supply enable: GPIO 22
//! - LED red / green / blue: GPIO 18 / 19 / 20
//!
//! # Usage
//!
//! ```bash
//! IMU_SAMPLING_MODE=pull cargo run --release --features pico2_w --bin imu_status
//! ```

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_rp::gpio::{Flex, Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Timer};
use imu_relay::app::{initialize, Board, PullCapture, PushCapture, Reporter, SamplingMode};
use imu_relay::devices::imu::Lsm6dsl;
use imu_relay::parameters::AppParams;
use imu_relay::platform::rp2350::{DefmtConsole, Rp2350Gpio, Rp2350I2c};
use imu_relay::platform::traits::I2cConfig;
use imu_relay::subsystems::relay::SampleRelay;
use {defmt_rtt as _, panic_probe as _};

#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: embassy_rp::block::ImageDef = embassy_rp::block::ImageDef::secure_exe();

type Imu = Lsm6dsl<Rp2350I2c<'static, I2C0>>;

static RELAY: SampleRelay = SampleRelay::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    let params = AppParams::from_env();

    defmt::info!("imu_status starting");

    let bus_config = I2cConfig::default();
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, {
        let mut config = i2c::Config::default();
        config.frequency = bus_config.frequency;
        config
    });

    let board = Board {
        leds: [
            Rp2350Gpio::new(Flex::new(p.PIN_18)),
            Rp2350Gpio::new(Flex::new(p.PIN_19)),
            Rp2350Gpio::new(Flex::new(p.PIN_20)),
        ],
        supply: Some(Rp2350Gpio::new(Flex::new(p.PIN_22))),
        sensor: Lsm6dsl::new(Rp2350I2c::new(i2c, bus_config)),
    };

    let mut delay = Delay;
    let init = match initialize(board, &RELAY, &params, &mut delay).await {
        Ok(init) => init,
        Err(e) => {
            defmt::error!("Startup failed in {} phase: {}", e.phase(), e);
            return;
        }
    };

    let console = DefmtConsole::new();
    match init.mode {
        SamplingMode::Push => {
            let int1 = Input::new(p.PIN_6, Pull::Down);
            match capture_task(init.sensor, int1) {
                Ok(token) => spawner.spawn(token),
                Err(_) => {
                    defmt::error!("Cannot spawn capture task");
                    return;
                }
            }

            let mut reporter = Reporter::new(init.indicator, &RELAY, PushCapture, console);
            reporter.run(&mut delay, params.report_interval_ms).await;
        }
        SamplingMode::Pull => {
            let capture = PullCapture::new(init.sensor);
            let mut reporter = Reporter::new(init.indicator, &RELAY, capture, console);
            reporter.run(&mut delay, params.report_interval_ms).await;
        }
    }
}

/// Services the LSM6DSL data-ready line
///
/// INT1 stays high until the output registers are read, so waiting on the
/// level never misses a sample.
#[embassy_executor::task]
async fn capture_task(mut imu: Imu, mut int1: Input<'static>) {
    loop {
        int1.wait_for_high().await;
        imu.service_interrupt();

        // Line still high: the fetch failed, retry after a pause
        if int1.is_high() {
            Timer::after_millis(1).await;
        }
    }
}
