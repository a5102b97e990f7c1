use crate::interval::Interval;
use glam::Vec3A;

/// Clamp applied before quantization so 1.0 maps to 255, not 256.
const INTENSITY: Interval = Interval { min: 0.0, max: 0.999 };

/// Gamma-2 transform: square root of the linear component.
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Gamma-correct and quantize one averaged linear color into three bytes.
pub fn write_pixel(pixel: &mut [u8], color: Vec3A) {
    for (byte, component) in pixel.iter_mut().zip([color.x, color.y, color.z]) {
        *byte = (256.0 * INTENSITY.clamp(linear_to_gamma(component))) as u8;
    }
}
