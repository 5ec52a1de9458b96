use argh::FromArgs;
use std::path::{Path, PathBuf};

use hybrid::{
    image::{ops, Image},
    imgproc::{color, filter, hybrid as hy},
    io::functional as F,
};

#[derive(FromArgs)]
/// Blur an image or compose a hybrid image from two images
struct Args {
    /// path to the image providing the low frequencies
    #[argh(option)]
    low: PathBuf,

    /// path to the image providing the high frequencies; if omitted `low` is only blurred
    #[argh(option)]
    high: Option<PathBuf>,

    /// the sigma of the low-pass filter applied to `low`
    #[argh(option, default = "7.0")]
    sigma_low: f32,

    /// the sigma of the low-pass filter removed from `high`
    #[argh(option, default = "7.0")]
    sigma_high: f32,

    /// convert the inputs to grayscale before filtering
    #[argh(switch)]
    gray: bool,

    /// also write the low frequency image and the offset high frequency image
    #[argh(switch)]
    save_components: bool,

    /// path to the output image, the format is taken from the extension
    #[argh(option, default = "PathBuf::from(\"hybrid.png\")")]
    output: PathBuf,
}

/// Offset added to a signed high frequency image so it can be looked at.
const HIGH_FREQUENCY_OFFSET: f32 = 128.0;

fn read_rgb_f32(path: &Path) -> Result<Image<f32, 3>, Box<dyn std::error::Error>> {
    let img = F::read_image_any_rgb8(path)?;
    let mut img_f32 = Image::from_size_val(img.size(), 0f32)?;
    ops::cast_and_scale(&img, &mut img_f32, 1.0)?;
    Ok(img_f32)
}

fn to_gray(img: &Image<f32, 3>) -> Result<Image<f32, 1>, Box<dyn std::error::Error>> {
    let mut gray = Image::from_size_val(img.size(), 0f32)?;
    color::gray_from_rgb(img, &mut gray)?;
    Ok(gray)
}

fn component_path(output: &Path, suffix: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "hybrid".to_string());
    let ext = output
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    output.with_file_name(format!("{stem}_{suffix}.{ext}"))
}

/// Runs the pipeline for any channel count and hands the u8 results to `write`.
fn run<const C: usize>(
    args: &Args,
    low: Image<f32, C>,
    high: Option<Image<f32, C>>,
    write: impl Fn(&Path, &Image<u8, C>) -> Result<(), Box<dyn std::error::Error>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(high) = high else {
        log::info!("blurring {} with sigma {}", args.low.display(), args.sigma_low);
        let blurred = filter::gaussian_blur(&low, args.sigma_low)?;
        return write(&args.output, &hy::to_u8(&blurred)?);
    };

    let low_freq = hy::low_frequency(&low, args.sigma_low)?;
    let high_freq = hy::high_frequency(&high, args.sigma_high)?;
    let composite = hy::add(&low_freq, &high_freq)?;

    write(&args.output, &hy::to_u8(&composite)?)?;

    if args.save_components {
        write(&component_path(&args.output, "low"), &hy::to_u8(&low_freq)?)?;

        let offset = Image(high_freq.map(|v| v + HIGH_FREQUENCY_OFFSET));
        write(&component_path(&args.output, "high"), &hy::to_u8(&offset)?)?;
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let low = read_rgb_f32(&args.low)?;
    let high = args.high.as_deref().map(read_rgb_f32).transpose()?;

    if let Some(high) = &high {
        if high.size() != low.size() {
            return Err(format!(
                "input images must have the same size: {} vs {}",
                low.size(),
                high.size()
            )
            .into());
        }
    }

    if args.gray {
        let high = high.as_ref().map(to_gray).transpose()?;
        run(&args, to_gray(&low)?, high, |path, img| {
            Ok(F::write_image_mono8(path, img)?)
        })?;
    } else {
        run(&args, low, high, |path, img| Ok(F::write_image_rgb8(path, img)?))?;
    }

    log::info!("wrote {}", args.output.display());

    Ok(())
}
