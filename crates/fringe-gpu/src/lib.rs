pub mod aberration;
pub mod mesh;
pub mod scene;
pub mod texture;

#[cfg(test)]
mod smoke {
    use crate::aberration::AberrationPass;
    use crate::scene::ScenePass;

    fn test_config() -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: wgpu::TextureFormat::Bgra8UnormSrgb,
            width: 64,
            height: 64,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    /// Builds both passes against a headless device. Run with
    /// `cargo test -- --ignored` on a machine with a GPU.
    #[test]
    #[ignore = "needs a GPU adapter"]
    fn passes_build_on_a_real_device() {
        let instance = wgpu::Instance::default();
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .expect("no suitable GPU adapter found");

        let (device, _queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("fringe-gpu test device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("failed to create GPU device");

        let config = test_config();
        let mut aberration = AberrationPass::new(&device, &config, 0.1);
        aberration.set_displacement(&device, 0.25);
        assert_eq!(aberration.displacement(), 0.25);

        let _scene = ScenePass::new(&device, &config);
    }
}
