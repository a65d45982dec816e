use crate::{
    bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, integer::UnsignedInteger,
    serde::Serde, ConstBitLength,
};

impl Serde for bool {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_bit(*self);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        reader.read_bit()
    }

    fn bit_length(&self) -> u32 {
        1
    }
}

impl ConstBitLength for bool {
    fn const_bit_length() -> u32 {
        1
    }
}

impl Serde for u8 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_byte(*self);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        reader.read_byte()
    }

    fn bit_length(&self) -> u32 {
        8
    }
}

impl ConstBitLength for u8 {
    fn const_bit_length() -> u32 {
        8
    }
}

// Low byte first, the bit order of `UnsignedInteger<16>`
impl Serde for u16 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        UnsignedInteger::<16>::new(*self).ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let value = UnsignedInteger::<16>::de(reader)?;
        Ok(value.to())
    }

    fn bit_length(&self) -> u32 {
        16
    }
}

impl ConstBitLength for u16 {
    fn const_bit_length() -> u32 {
        16
    }
}
