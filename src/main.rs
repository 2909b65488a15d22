//! Scratch to DCC++ Bridge Main Application
//!
//! Entry point for the STM32G474 bridge firmware. Brings up both UARTs,
//! the buttons and the status panel, then spawns one task per activity.

#![no_std]
#![no_main]

use defmt::{info, unwrap, warn};
use embassy_executor::Spawner;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Pull;
use embassy_stm32::i2c::I2c;
use embassy_stm32::time::Hertz;
use embassy_stm32::usart::{self, BufferedUart, BufferedUartRx, BufferedUartTx};
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use scratch_dcc_bridge::ble::transport::{run_event_pump, CoprocessorTransport, LinkStatus};
use scratch_dcc_bridge::config::buffers;
use scratch_dcc_bridge::drivers::display::{run_display, Panel};
use scratch_dcc_bridge::hal::gpio::ButtonInput;
use scratch_dcc_bridge::link::tasks::{run_command_forwarder, run_notifier, run_telemetry_reader};
use scratch_dcc_bridge::prelude::*;

bind_interrupts!(struct Irqs {
    USART1 => usart::BufferedInterruptHandler<peripherals::USART1>;
    USART2 => usart::BufferedInterruptHandler<peripherals::USART2>;
    I2C1_EV => embassy_stm32::i2c::EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => embassy_stm32::i2c::ErrorInterruptHandler<peripherals::I2C1>;
});

static BRIDGE: Bridge<CriticalSectionRawMutex> = Bridge::new(LinkConfig::DEFAULT);
static LINK_STATUS: LinkStatus = LinkStatus::new();
static DISPLAY: Channel<CriticalSectionRawMutex, DisplayCommand, DISPLAY_QUEUE_DEPTH> =
    Channel::new();

static DCC_TX_BUF: StaticCell<[u8; buffers::DCC_TX]> = StaticCell::new();
static DCC_RX_BUF: StaticCell<[u8; buffers::DCC_RX]> = StaticCell::new();
static BLE_TX_BUF: StaticCell<[u8; buffers::BLE_TX]> = StaticCell::new();
static BLE_RX_BUF: StaticCell<[u8; buffers::BLE_RX]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Scratch DCC++ bridge v{}", env!("CARGO_PKG_VERSION"));

    let p = embassy_stm32::init(embassy_stm32::Config::default());

    // USART1: DCC++ base station (PA9 = TX, PA10 = RX)
    let mut dcc_config = usart::Config::default();
    dcc_config.baudrate = DCC_BAUD;
    let dcc = unwrap!(BufferedUart::new(
        p.USART1,
        Irqs,
        p.PA10,
        p.PA9,
        DCC_TX_BUF.init([0; buffers::DCC_TX]),
        DCC_RX_BUF.init([0; buffers::DCC_RX]),
        dcc_config,
    ));
    let (dcc_tx, dcc_rx) = dcc.split();

    // USART2: BLE co-processor (PA2 = TX, PA3 = RX)
    let mut ble_config = usart::Config::default();
    ble_config.baudrate = BLE_BAUD;
    let ble = unwrap!(BufferedUart::new(
        p.USART2,
        Irqs,
        p.PA3,
        p.PA2,
        BLE_TX_BUF.init([0; buffers::BLE_TX]),
        BLE_RX_BUF.init([0; buffers::BLE_RX]),
        ble_config,
    ));
    let (ble_tx, ble_rx) = ble.split();

    // Buttons, active low
    let button_a = ButtonInput::new(ExtiInput::new(p.PC13, p.EXTI13, Pull::Up), Button::A);
    let button_b = ButtonInput::new(ExtiInput::new(p.PB1, p.EXTI1, Pull::Up), Button::B);

    // I2C1: status panel (PB8 = SCL, PB9 = SDA)
    let i2c = I2c::new(
        p.I2C1,
        p.PB8,
        p.PB9,
        Irqs,
        p.DMA1_CH1,
        p.DMA1_CH2,
        Hertz(400_000),
        Default::default(),
    );
    let mut panel = Panel::new(i2c);
    if let Err(e) = panel.init().await {
        warn!("panel init failed: {}", defmt::Debug2Format(&e));
    }

    DISPLAY.sender().print_char(STARTUP_CHAR);

    unwrap!(spawner.spawn(display_task(panel)));
    unwrap!(spawner.spawn(notifier_task(ble_tx)));
    unwrap!(spawner.spawn(coproc_event_task(ble_rx)));
    unwrap!(spawner.spawn(telemetry_task(dcc_rx)));
    unwrap!(spawner.spawn(forwarder_task(dcc_tx)));
    unwrap!(spawner.spawn(button_task(button_a)));
    unwrap!(spawner.spawn(button_task(button_b)));

    info!("Tasks spawned");
}

/// Advertise the service, then notify the sensor frame periodically
#[embassy_executor::task]
async fn notifier_task(tx: BufferedUartTx<'static>) {
    let mut transport = CoprocessorTransport::new(tx, &LINK_STATUS);
    if let Err(e) = transport.start_service().await {
        warn!("service start failed: {}", e);
    }
    run_notifier(&BRIDGE, &mut transport).await
}

/// Dispatch co-processor events
#[embassy_executor::task]
async fn coproc_event_task(mut rx: BufferedUartRx<'static>) {
    let mut display = DISPLAY.sender();
    run_event_pump(&BRIDGE, &mut rx, &LINK_STATUS, &mut display).await;
}

/// Latch sensor reports from the base station
#[embassy_executor::task]
async fn telemetry_task(mut rx: BufferedUartRx<'static>) {
    run_telemetry_reader(&BRIDGE, &mut rx).await;
}

/// Forward published commands to the base station
#[embassy_executor::task]
async fn forwarder_task(mut tx: BufferedUartTx<'static>) {
    run_command_forwarder(&BRIDGE, &mut tx).await
}

/// Latch button presses
#[embassy_executor::task(pool_size = 2)]
async fn button_task(mut input: ButtonInput<ExtiInput<'static>>) {
    loop {
        let button = input.wait_for_press().await;
        BRIDGE.on_button(button);
    }
}

/// Drive the status panel
#[embassy_executor::task]
async fn display_task(mut panel: Panel<'static>) {
    run_display(&mut panel, DISPLAY.receiver()).await
}
