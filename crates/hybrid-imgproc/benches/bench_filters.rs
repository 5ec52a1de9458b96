use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use hybrid_image::Image;
use hybrid_imgproc::filter::{gaussian_blur, kernels, separable_filter};

use image::RgbImage;
use imageproc::filter::gaussian_blur_f32;
use rand::Rng;

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gaussian Blur");
    let mut rng = rand::rng();

    for (width, height) in [(256, 224), (512, 448)].iter() {
        for sigma in [0.5f32, 1.0, 2.0, 3.0].iter() {
            let kernel_size = kernels::kernel_size_from_sigma(*sigma).unwrap();
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * kernel_size) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);

            // input image
            let image_data = (0..width * height * 3)
                .map(|_| rng.random_range(0.0..255.0))
                .collect();
            let image_size = [*width, *height].into();
            let image_f32 = Image::<f32, 3>::new(image_size, image_data).unwrap();

            group.bench_with_input(
                BenchmarkId::new("gaussian_blur_2d", &parameter_string),
                &image_f32,
                |b, i| b.iter(|| black_box(gaussian_blur(i, *sigma))),
            );

            let kernel = kernels::gaussian_kernel_1d(*sigma).unwrap();
            group.bench_with_input(
                BenchmarkId::new("separable_filter", &parameter_string),
                &image_f32,
                |b, i| b.iter(|| black_box(separable_filter(i, &kernel, &kernel))),
            );

            group.bench_with_input(
                BenchmarkId::new("gaussian_blur_imageproc", &parameter_string),
                &image_f32,
                |b, i| {
                    let rgb_image = RgbImage::new(i.cols() as u32, i.rows() as u32);
                    b.iter(|| black_box(gaussian_blur_f32(&rgb_image, *sigma)))
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
