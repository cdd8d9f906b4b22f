/// Maps a key to a 32-bit digest. The map reduces the digest modulo its
/// bucket count, so the quality of the low bits matters most.
pub trait KeyHasher<K: ?Sized> {
    fn hash_key(&self, key: &K) -> u32;
}

/// Knuth's multiplicative method for signed integers (one-to-one).
#[derive(Debug, Default, Clone, Copy)]
pub struct KnuthMultiplicative;

impl KeyHasher<i32> for KnuthMultiplicative {
    #[inline]
    fn hash_key(&self, key: &i32) -> u32 {
        (*key as u32).wrapping_mul(2_654_435_761)
    }
}

/// Robert Jenkins' 32-bit integer mix (one-to-one).
#[derive(Debug, Default, Clone, Copy)]
pub struct JenkinsMix32;

impl KeyHasher<u32> for JenkinsMix32 {
    #[inline]
    fn hash_key(&self, key: &u32) -> u32 {
        let mut key = (!*key).wrapping_add(key << 15);
        key ^= key >> 12;
        key = key.wrapping_add(key << 2);
        key = (key ^ (key >> 4)).wrapping_mul(2057);
        key ^ (key >> 16)
    }
}

/// 64-bit mix folded down to the low 32 bits.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mix64;

impl KeyHasher<u64> for Mix64 {
    #[inline]
    fn hash_key(&self, key: &u64) -> u32 {
        let mut key = (!*key).wrapping_add(key << 18);
        key = (key ^ (key >> 31)).wrapping_mul(21);
        key ^= key >> 11;
        key = key.wrapping_add(key << 6);
        (key ^ (key >> 22)) as u32
    }
}

/// Jenkins' one-at-a-time hash over the bytes of a string.
#[derive(Debug, Default, Clone, Copy)]
pub struct OneAtATime;

impl KeyHasher<str> for OneAtATime {
    fn hash_key(&self, key: &str) -> u32 {
        let mut hash: u32 = 0;
        for &byte in key.as_bytes() {
            // bytes are sign-extended, as with a signed `char`
            hash = hash.wrapping_add(byte as i8 as u32);
            hash = hash.wrapping_add(hash << 10);
            hash ^= hash >> 6;
        }
        hash = hash.wrapping_add(hash << 3);
        hash ^= hash >> 11;
        hash.wrapping_add(hash << 15)
    }
}

impl KeyHasher<String> for OneAtATime {
    #[inline]
    fn hash_key(&self, key: &String) -> u32 {
        <Self as KeyHasher<str>>::hash_key(self, key)
    }
}

/// Every reference strategy behind one type, picked by key type.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassHash;

impl KeyHasher<i32> for ClassHash {
    #[inline]
    fn hash_key(&self, key: &i32) -> u32 {
        KnuthMultiplicative.hash_key(key)
    }
}

impl KeyHasher<u32> for ClassHash {
    #[inline]
    fn hash_key(&self, key: &u32) -> u32 {
        JenkinsMix32.hash_key(key)
    }
}

impl KeyHasher<u64> for ClassHash {
    #[inline]
    fn hash_key(&self, key: &u64) -> u32 {
        Mix64.hash_key(key)
    }
}

impl KeyHasher<str> for ClassHash {
    #[inline]
    fn hash_key(&self, key: &str) -> u32 {
        OneAtATime.hash_key(key)
    }
}

impl KeyHasher<String> for ClassHash {
    #[inline]
    fn hash_key(&self, key: &String) -> u32 {
        OneAtATime.hash_key(key.as_str())
    }
}
