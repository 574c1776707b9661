use textbox_gen::layout::{BoxSize, TextBox, TextBoxConfig};
use textbox_gen::{colours, Font, FontConfig, TextBoxError, TtfShaper};

fn main() -> Result<(), TextBoxError> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let font_path = args
        .next()
        .unwrap_or_else(|| "assets/DejaVuSans.ttf".to_string());
    let text = args.next().unwrap_or_else(|| lipsum::lipsum(12));
    let config: TextBoxConfig = match args.next() {
        Some(path) => {
            let data = std::fs::read_to_string(path)?;
            serde_json::from_str(&data).expect("config is valid")
        }
        None => TextBoxConfig::default(),
    };

    let font = Font::load_from_disk(&font_path)?;
    println!(
        "using {}",
        font.name().unwrap_or_else(|| font_path.clone())
    );

    let textbox = TextBox::from_config(&config, TtfShaper::new(font));
    let mut rng = rand::thread_rng();

    match textbox.fit(
        BoxSize::new(480.0, 32.0),
        &text,
        &FontConfig::new(colours::BLACK),
        &mut rng,
    ) {
        Some(fitted) => {
            println!("fitted {:?} ({:?})", fitted.text, fitted.mode);
            fitted.layer.save("fit-text.png")?;
        }
        None => println!("nothing fit"),
    }

    Ok(())
}
