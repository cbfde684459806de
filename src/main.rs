use config::Config;
use device::GlDevice;
use error::Result;
use renderer::FrameRenderer;
use window::GlWindow;

mod buffer;
mod config;
mod device;
mod error;
mod geometry;
mod input;
mod logging;
mod renderer;
mod shader;
mod vertex_array;
mod window;

fn main() {
    let config = Config::default();

    logging::init_logging(config.logging.clone());

    let code = match run(&config) {
        Ok(()) => 0,
        Err(err) => {
            log::error!("{}", err);
            -1
        }
    };

    std::process::exit(code);
}

fn run(config: &Config) -> Result<()> {
    // Declared first so it is dropped after the renderer has released its
    // resources.
    let mut window = GlWindow::create(&config.window)?;

    let mut renderer = FrameRenderer::new(GlDevice, config);
    renderer.build_program(&config.shaders)?;
    renderer.upload_geometry(&geometry::triangle())?;

    let frames = renderer.run(&mut window)?;
    log::info!("presented {} frames", frames);

    renderer.shutdown();

    Ok(())
}
