/// "Hello, world" in a spread of scripts, one list row each.
pub const HELLO_WORLDS: &[&str] = &[
    "• 👋🗺 🎉",
    "• Hello, world!",
    "• 你好世界！",
    "• नमस्ते दुनिया!",
    "• ¡Hola Mundo!",
    "• Bonjour monde!",
    "• مرحبا بالعالم!",
    "• ওহে বিশ্ব!",
    "• Привет мир!",
    "• Olá Mundo!",
    "• Halo Dunia!",
    "• ہیلو ، دنیا!",
    "• Hallo Welt!",
    "• こんにちは世界！",
    "• Salamu Dunia!",
    "• नमस्कार, जग!",
    "• హలో, ప్రపంచం!",
    "• Selam Dünya!",
    "• வணக்கம், உலகமே!",
    "• ਸਤਿ ਸ੍ਰੀ ਅਕਾਲ ਦੁਨਿਆ!",
    "• 안녕, 세상!",
    "• Chào thế giới!",
    "• Sannu Duniya!",
    "• Halo, jagad!",
    "• Ciao mondo!",
    "• สวัสดีชาวโลก!",
    "• હેલો, વિશ્વ!",
    "• ಹಲೋ, ಜಗತ್ತು!",
    "• سلام دنیا!",
    "• Kumusta, mundo!",
];

pub fn default_greetings() -> Vec<String> {
    HELLO_WORLDS.iter().map(|line| (*line).to_owned()).collect()
}
