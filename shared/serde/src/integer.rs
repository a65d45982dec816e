use crate::{
    bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, serde::Serde, ConstBitLength,
};

pub trait SerdeIntegerConversion<const BITS: u8> {
    fn from(value: &UnsignedInteger<BITS>) -> Self;
}

/// Fixed-width unsigned integer occupying exactly `BITS` bits on the wire
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct UnsignedInteger<const BITS: u8> {
    value: u64,
}

impl<const BITS: u8> UnsignedInteger<BITS> {
    /// # Panics
    /// Panics if `BITS` is 0 or above 64, or if `value` does not fit in `BITS` bits
    pub fn new<T: Into<u64>>(value: T) -> Self {
        let value = value.into();
        if BITS == 0 {
            panic!("can't create an integer with 0 bits...");
        }
        if BITS > 64 {
            panic!("can't create an integer with more than 64 bits...");
        }
        if BITS < 64 && value >= 1_u64 << BITS {
            panic!(
                "with {} bits, can't encode number greater than {}",
                BITS,
                (1_u64 << BITS) - 1
            );
        }

        Self { value }
    }

    pub fn get(&self) -> u64 {
        self.value
    }

    pub fn to<T: SerdeIntegerConversion<BITS>>(&self) -> T {
        T::from(self)
    }
}

impl<const BITS: u8> Serde for UnsignedInteger<BITS> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let mut value = self.value;
        for _ in 0..BITS {
            writer.write_bit(value & 1 != 0);
            value >>= 1;
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mut value: u64 = 0;
        for index in 0..BITS {
            if reader.read_bit()? {
                value |= 1 << index;
            }
        }
        Ok(Self { value })
    }

    fn bit_length(&self) -> u32 {
        BITS as u32
    }
}

impl<const BITS: u8> ConstBitLength for UnsignedInteger<BITS> {
    fn const_bit_length() -> u32 {
        BITS as u32
    }
}

impl<const BITS: u8, T: TryFrom<u64>> SerdeIntegerConversion<BITS> for T {
    fn from(value: &UnsignedInteger<BITS>) -> Self {
        let Ok(t_value) = T::try_from(value.value) else {
            panic!("UnsignedInteger's value is out of range to convert to this type.");
        };
        t_value
    }
}
