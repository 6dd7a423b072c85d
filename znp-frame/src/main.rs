//! # cc2530-frame
//!
//! Writes one ZNP request frame to the coordinator's serial device and prints the reply.
//!
//! ## Overview
//!
//! The request is given as hexadecimal bytes: subsystem byte, command id, then payload.
//! Every frame received until the reply arrives is printed on its own line as hex,
//! without the length and FCS bytes. With `--stdout` the encoded request is written to
//! stdout instead and the device is never opened.
pub mod serial;

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use env_logger::Env;
use znp_client::{Link, client::Builder, write_capture};
use znp_protocol::{Frame, LengthField, MAX_PAYLOAD_LEN};

use crate::serial::SerialPort;

const DEFAULT_TTY: &str = "/dev/tty.zigbee";

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum LengthArg {
    /// Length counts subsystem, command and payload
    Content,
    /// Length counts the payload only (Z-Stack MT)
    Payload,
}

impl From<LengthArg> for LengthField {
    fn from(value: LengthArg) -> Self {
        match value {
            LengthArg::Content => LengthField::Content,
            LengthArg::Payload => LengthField::Payload,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "cc2530-frame",
    about = "Write a ZNP request frame to a serial device and print the response frame",
    long_about = None
)]
struct Args {
    #[arg(short, long, help = "The tty device to use", default_value = DEFAULT_TTY)]
    tty: PathBuf,

    #[arg(long, help = "Write the frame to stdout instead of to the tty")]
    stdout: bool,

    #[arg(
        short,
        long,
        help = "Seconds to wait before reopening the tty after a reset command",
        default_value = "0"
    )]
    delay: u64,

    #[arg(short, long, default_value = "115200")]
    baud: u32,

    #[arg(long, value_enum, default_value = "content")]
    length_field: LengthArg,

    /// Subsystem byte, command id and payload bytes in hex
    #[arg(value_name = "HEX", required = true, num_args = 2..=MAX_PAYLOAD_LEN + 2)]
    bytes: Vec<String>,
}

/// Sends the request described by `args`. Captured frames and received frames go to `out`.
/// `open_link` is only called when the request goes to a device.
fn run_with<L: Link>(
    args: &Args,
    out: &mut impl Write,
    open_link: impl FnOnce() -> io::Result<L>,
) -> Result<(), Box<dyn Error>> {
    let request = Frame::from_hex_args(&args.bytes[..])?;
    let length_field = LengthField::from(args.length_field);
    log::debug!("Built request frame: {}", request);

    if args.stdout {
        write_capture(&request, length_field, out)?;
        return Ok(());
    }

    let mut client = Builder::new()
        .reset_delay(Duration::from_secs(args.delay))
        .length_field(length_field)
        .connect(open_link()?)?;
    let mut print_error = None;
    client.request(&request, |frame| {
        if let Err(e) = writeln!(out, "{}", frame) {
            print_error.get_or_insert(e);
        }
    })?;
    client.close();
    match print_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    run_with(args, &mut io::stdout().lock(), || {
        SerialPort::new(&args.tty, args.baud)
    })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    log::debug!(
        "Parsed arguments: tty={}, stdout={}, delay={}, baud={}",
        args.tty.display(),
        args.stdout,
        args.delay,
        args.baud
    );

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("cc2530-frame: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Args, DEFAULT_TTY, LengthArg, run_with};
    use clap::{CommandFactory, Parser, error::ErrorKind};
    use std::time::Duration;
    use znp_client::reset::WAKE_BYTE;
    use znp_protocol::{Frame, LengthField};
    use znp_tests::{MockLink, Op};

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("cc2530-frame").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn verify_command() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["cc2530-frame", "21", "02", "01", "2"]).unwrap();
        assert_eq!(args.tty.to_str(), Some(DEFAULT_TTY));
        assert!(!args.stdout);
        assert_eq!(args.delay, 0);
        assert_eq!(args.baud, 115200);
        assert_eq!(args.length_field, LengthArg::Content);
        assert_eq!(args.bytes, vec!["21", "02", "01", "2"]);
    }

    #[test]
    fn options() {
        let args = Args::try_parse_from([
            "cc2530-frame",
            "--tty",
            "/dev/ttyACM0",
            "--stdout",
            "-d",
            "2",
            "--length-field",
            "payload",
            "41",
            "00",
            "00",
        ])
        .unwrap();
        assert_eq!(args.tty.to_str(), Some("/dev/ttyACM0"));
        assert!(args.stdout);
        assert_eq!(args.delay, 2);
        assert_eq!(args.length_field, LengthArg::Payload);
        assert_eq!(args.bytes, vec!["41", "00", "00"]);
    }

    #[test]
    fn needs_subsystem_and_command() {
        let err = Args::try_parse_from(["cc2530-frame", "21"]).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::TooFewValues | ErrorKind::WrongNumberOfValues
        ));
        let err = Args::try_parse_from(["cc2530-frame"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn rejects_bad_hex() {
        let args = parse(&["--stdout", "21", "0x2"]);
        let mut out = Vec::new();
        let err = run_with(&args, &mut out, || Ok(MockLink::new())).unwrap_err();
        assert!(err.to_string().contains("0x2"));
        assert!(out.is_empty());
    }

    #[test]
    fn capture_never_touches_the_device() {
        let args = parse(&["--stdout", "-d", "2", "41", "00", "00"]);
        let mut out = Vec::new();
        let mut opened = false;
        run_with(&args, &mut out, || {
            opened = true;
            Ok(MockLink::new())
        })
        .unwrap();
        assert!(!opened);
        assert_eq!(out, vec![0xFE, 0x03, 0x41, 0x00, 0x00, 0x42]);
    }

    #[test]
    fn device_request_prints_every_frame() {
        let args = parse(&["-d", "2", "41", "00", "00"]);
        let mut link = MockLink::new();
        link.push_frame(
            &Frame::new(0x41, 0x80, &[0x00, 0x02]).unwrap(),
            LengthField::Content,
        );
        let mut out = Vec::new();
        run_with(&args, &mut out, || Ok(&mut link)).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "41 80 00 02\n");
        let request = vec![0xFE, 0x03, 0x41, 0x00, 0x00, 0x42];
        assert_eq!(
            link.ops(),
            &[
                Op::Open,
                Op::Write(request),
                Op::Close,
                Op::Wait(Duration::from_secs(2)),
                Op::Open,
                Op::Write(vec![WAKE_BYTE]),
                Op::Close,
                Op::Open,
                Op::Close,
            ]
        );
    }

    #[test]
    fn rejects_oversized_payload() {
        let mut argv = vec!["cc2530-frame".to_string()];
        argv.extend(std::iter::repeat_n("00".to_string(), 256));
        assert!(Args::try_parse_from(&argv).is_err());
        argv.pop();
        assert!(Args::try_parse_from(&argv).is_ok());
    }
}
