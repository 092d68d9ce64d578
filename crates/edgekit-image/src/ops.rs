use num_traits::Float;

/// Round a floating point channel value and clamp it to the 16-bit range.
///
/// NaN saturates to zero.
///
/// # Examples
///
/// ```
/// use edgekit_image::ops::saturate_channel;
///
/// assert_eq!(saturate_channel(12.5f64), 13);
/// assert_eq!(saturate_channel(-4.0f32), 0);
/// assert_eq!(saturate_channel(1.0e9f64), u16::MAX);
/// ```
pub fn saturate_channel<T: Float>(value: T) -> u16 {
    let max = T::from(u16::MAX).unwrap_or_else(T::max_value);
    let rounded = value.round();
    if rounded.is_nan() || rounded <= T::zero() {
        0
    } else if rounded >= max {
        u16::MAX
    } else {
        rounded.to_u16().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::saturate_channel;

    #[test]
    fn saturate_rounding() {
        assert_eq!(saturate_channel(0.49f64), 0);
        assert_eq!(saturate_channel(0.5f64), 1);
        assert_eq!(saturate_channel(65534.6f64), u16::MAX);
        assert_eq!(saturate_channel(f64::NAN), 0);
        assert_eq!(saturate_channel(f64::INFINITY), u16::MAX);
    }
}
