use std::{
    fmt,
    io::{Read, Write},
};

use crate::binary::{Deserialize, Deserializer, Error, ErrorKind, Serialize, Serializer};

macro_rules! const_primitive {
    ($Underlying:ty, $NewType:tt) => {
        #[doc = concat!("Always serializes to the same `", stringify!($Underlying), "`.\n\nDuring deserialization if the value is not that constant, an error is thrown.")]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
        pub struct $NewType<const VALUE: $Underlying>;

        impl<const VALUE: $Underlying> Deserialize for $NewType<VALUE> {
            fn deserialize(deserializer: &mut Deserializer<impl Read>) -> Result<Self, Error> {
                let value = deserializer.deserialize::<$Underlying>()?;
                if value != VALUE {
                    Err(ErrorKind::Deserialize.make(format!("constant {VALUE:#x} expected, but got {value:#x}")))
                } else {
                    Ok(Self)
                }
            }
        }

        impl<const VALUE: $Underlying> Serialize for $NewType<VALUE> {
            fn serialize(&self, serializer: &mut Serializer<impl Write>) -> Result<(), Error> {
                VALUE.serialize(serializer)
            }
        }

        impl<const VALUE: $Underlying> fmt::Debug for $NewType<VALUE> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(&VALUE, f)
            }
        }

        impl<const VALUE: $Underlying> fmt::Display for $NewType<VALUE> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&VALUE, f)
            }
        }
    }
}

const_primitive!(u16, ConstU16);
const_primitive!(u32, ConstU32);

#[cfg(test)]
mod tests {
    use crate::binary::{deserialize, serialize};

    use super::ConstU32;

    #[test]
    fn mismatched_constant_is_rejected() {
        let bytes = serialize(&ConstU32::<0xCAFE>).unwrap();
        assert!(deserialize::<ConstU32<0xCAFE>>(&bytes).is_ok());
        let error = deserialize::<ConstU32<0xBEEF>>(&bytes).unwrap_err();
        assert!(error.root_cause().contains("0xbeef expected"));
    }
}
