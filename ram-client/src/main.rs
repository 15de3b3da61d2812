//! Interactive menu client for the RAM-backed device.
use std::io::{self, BufRead, Write as _};
use std::time::Duration;

use clap::Parser;
use ram_device::{
    ControlOp, ControlReply, DeviceError, ExclusiveDevice, ExclusiveSession, ReclaimingDevice,
    ReclaimingSession, Whence, DEFAULT_CAPACITY,
};

#[derive(Parser)]
#[command(name = "ram-client", about = "Drive the RAM-backed device from a menu")]
struct Options {
    /// Access gate the device runs under.
    #[arg(long, value_enum, default_value = "exclusive")]
    gate: GateChoice,

    /// Region capacity in bytes.
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: u32,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum GateChoice {
    Exclusive,
    Reclaiming,
}

enum Device {
    Exclusive(ExclusiveDevice),
    Reclaiming(ReclaimingDevice),
}

/// One open session, whichever gate backs it.
enum Session<'dev> {
    Exclusive(ExclusiveSession<'dev>),
    Reclaiming(ReclaimingSession<'dev>),
}

impl Device {
    fn new(options: &Options) -> Result<Self, io::Error> {
        Ok(match options.gate {
            GateChoice::Exclusive => Device::Exclusive(ExclusiveDevice::new(options.capacity)?),
            GateChoice::Reclaiming => Device::Reclaiming(ReclaimingDevice::new(options.capacity)?),
        })
    }

    fn open(&self) -> Result<Session<'_>, DeviceError> {
        Ok(match self {
            Device::Exclusive(device) => Session::Exclusive(device.open()?),
            Device::Reclaiming(device) => Session::Reclaiming(device.open()?),
        })
    }
}

impl Session<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, DeviceError> {
        match self {
            Session::Exclusive(session) => session.read(buf),
            Session::Reclaiming(session) => session.read(buf),
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, DeviceError> {
        match self {
            Session::Exclusive(session) => session.write(data),
            Session::Reclaiming(session) => session.write(data),
        }
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<i64, DeviceError> {
        match self {
            Session::Exclusive(session) => session.seek(offset, whence),
            Session::Reclaiming(session) => session.seek(offset, whence),
        }
    }

    fn control(&mut self, op: ControlOp) -> Result<ControlReply, DeviceError> {
        match self {
            Session::Exclusive(session) => session.control(op),
            Session::Reclaiming(session) => session.control(op),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let options = Options::parse();
    let device = Device::new(&options).expect("failed to allocate the device region");

    // A busy device is expected under the exclusive gate; keep retrying
    // the way a well-behaved client does.
    let mut session = loop {
        match device.open() {
            Ok(session) => break session,
            Err(DeviceError::Busy) => {
                println!("Device busy, retrying...");
                std::thread::sleep(Duration::from_millis(100));
            }
            Err(err) => {
                eprintln!("Failed to open device: {err}");
                std::process::exit(1);
            }
        }
    };
    println!("Device opened successfully");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!();
        println!("Options:");
        println!("1. Write");
        println!("2. Read");
        println!("3. Seek");
        println!("4. Clear Buffer");
        println!("5. Get Buffer Size");
        println!("6. Count Vowels");
        println!("7. Exit");
        let Some(choice) = prompt(&mut lines, "Choice: ") else {
            break;
        };

        match choice.trim() {
            "1" => write_data(&mut session, &mut lines),
            "2" => read_data(&mut session, &mut lines),
            "3" => seek(&mut session, &mut lines),
            "4" => match session.control(ControlOp::Clear) {
                Ok(_) => println!("Buffer cleared."),
                Err(err) => println!("Clear failed: {err}"),
            },
            "5" => {
                if let Ok(ControlReply::Size(size)) = session.control(ControlOp::GetSize) {
                    println!("Buffer size: {size} bytes");
                }
            }
            "6" => {
                if let Ok(ControlReply::VowelCount(count)) = session.control(ControlOp::CountVowels)
                {
                    println!("Vowel count in buffer: {count}");
                }
            }
            "7" => break,
            other => println!("Invalid choice: {other}"),
        }
    }
}

fn write_data(session: &mut Session<'_>, lines: &mut impl Iterator<Item = io::Result<String>>) {
    let Some(data) = prompt(lines, "Enter data to write: ") else {
        return;
    };
    match session.write(data.as_bytes()) {
        Ok(n) => println!("Wrote {n} bytes"),
        Err(err) => println!("Write failed: {err}"),
    }
}

fn read_data(session: &mut Session<'_>, lines: &mut impl Iterator<Item = io::Result<String>>) {
    let Some(count) = prompt(lines, "Enter number of bytes to read: ") else {
        return;
    };
    let Ok(count) = count.trim().parse::<usize>() else {
        println!("Invalid read size.");
        return;
    };

    let mut buf = vec![0u8; count];
    match session.read(&mut buf) {
        Ok(0) => println!("No data read."),
        Ok(n) => println!("Read: {}", String::from_utf8_lossy(&buf[..n])),
        Err(err) => println!("Read failed: {err}"),
    }
}

fn seek(session: &mut Session<'_>, lines: &mut impl Iterator<Item = io::Result<String>>) {
    let Some(position) = prompt(lines, "Enter seek position: ") else {
        return;
    };
    let Ok(position) = position.trim().parse::<i64>() else {
        println!("Invalid seek position.");
        return;
    };

    let Some(whence) = prompt(lines, "Whence (0=start, 1=current, 2=end): ") else {
        return;
    };
    let whence = match whence.trim().parse::<u32>().ok().and_then(Whence::from_raw) {
        Some(whence) => whence,
        None => {
            println!("Invalid whence.");
            return;
        }
    };

    match session.seek(position, whence) {
        Ok(position) => println!("Position: {position}"),
        Err(err) => println!("Seek failed: {err}"),
    }
}

/// Print `text` without a newline and read one line of input; `None` on
/// end of input.
fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    text: &str,
) -> Option<String> {
    print!("{text}");
    let _ = io::stdout().flush();
    lines.next()?.ok()
}
