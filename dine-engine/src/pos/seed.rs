//! Built-in defaults used when no snapshot exists yet

use shared::models::{DiningTable, MenuItem};

/// Seating capacity of tables 1..=12
pub const TABLE_CAPACITIES: [u32; 12] = [2, 4, 4, 6, 2, 4, 8, 2, 4, 6, 4, 2];

pub fn default_tables() -> Vec<DiningTable> {
    TABLE_CAPACITIES
        .iter()
        .enumerate()
        .map(|(i, &capacity)| DiningTable::new(i as i64 + 1, capacity))
        .collect()
}

pub fn default_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new(1, "French Fries", 80.0, "Appetizers",
            "Classic crispy potato french fries served with ketchup."),
        MenuItem::new(2, "Honey Chilli Potato", 110.0, "Appetizers",
            "Crispy fried potatoes tossed in a sweet and spicy honey chilli sauce."),
        MenuItem::new(3, "Grill Sandwich", 90.0, "Snacks",
            "A classic grilled sandwich with a mixed vegetable filling."),
        MenuItem::new(4, "Paneer Sandwich", 100.0, "Snacks",
            "Grilled sandwich stuffed with spiced paneer and vegetables."),
        MenuItem::new(5, "Veg Burger", 95.0, "Main Course",
            "A delicious vegetable patty in a soft bun with lettuce and sauces."),
        MenuItem::new(6, "Cheese Burger", 105.0, "Main Course",
            "A vegetable patty with an extra slice of cheese for a creamy taste."),
        MenuItem::new(7, "Steamed Momo", 90.0, "Appetizers",
            "Soft steamed dumplings filled with a savory vegetable mix."),
        MenuItem::new(8, "Darjeeling Momo", 100.0, "Appetizers",
            "Authentic Darjeeling-style dumplings with a distinct flavor."),
        MenuItem::new(9, "Masala Chai", 50.0, "Beverages",
            "Aromatic and spiced Indian tea, brewed with milk."),
        MenuItem::new(10, "Mojito", 85.0, "Beverages",
            "A refreshing muddled drink with mint and lime."),
        MenuItem::new(11, "Chocolate Cake", 115.0, "Desserts",
            "A rich and moist slice of chocolate layer cake."),
        MenuItem::new(12, "Sweet Corn Soup", 75.0, "Soups",
            "A creamy and comforting soup made with sweet corn kernels."),
        MenuItem::new(13, "Chowmein", 110.0, "Main Course",
            "Stir-fried noodles with a mix of fresh vegetables and sauces."),
        MenuItem::new(14, "Hakka Noodles", 115.0, "Main Course",
            "Indo-Chinese style noodles with a garlic and soy flavor."),
        MenuItem::new(15, "White Sauce Pasta", 120.0, "Main Course",
            "Pasta in a creamy white sauce with vegetables and herbs."),
        MenuItem::new(16, "Spring Roll", 85.0, "Appetizers",
            "Crispy fried rolls stuffed with a savory vegetable filling."),
        MenuItem::new(17, "Fried Rice", 100.0, "Main Course",
            "Wok-tossed rice with assorted vegetables and soy sauce."),
        MenuItem::new(18, "Thukpa", 110.0, "Soups",
            "A hearty Himalayan noodle soup with vegetables."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_tables_with_fixed_capacities() {
        let tables = default_tables();
        assert_eq!(tables.len(), 12);
        assert_eq!(tables[6].capacity, 8);
        assert_eq!(tables[11].name, "Table 12");
        let caps: Vec<u32> = tables.iter().map(|t| t.capacity).collect();
        assert_eq!(caps, TABLE_CAPACITIES);
    }

    #[test]
    fn seed_menu_ids_are_sequential() {
        let menu = default_menu();
        assert_eq!(menu.len(), 18);
        for (i, item) in menu.iter().enumerate() {
            assert_eq!(item.id, i as i64 + 1);
            assert!(item.available);
        }
        assert_eq!(menu[0].price, 80.0);
    }
}
