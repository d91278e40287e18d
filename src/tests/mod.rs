mod instruction_test;
